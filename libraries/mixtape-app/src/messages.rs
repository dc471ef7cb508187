//! User-facing prompts and status messages.

pub const CONFIRM_DELETE_PROJECT: &str = "Delete this project and its tracks?";
pub const CONFIRM_DELETE_TRACK: &str = "Delete this track?";
pub const TRACK_TITLE_PROMPT: &str = "Track title";

pub const CREATE_PROJECT_FAILED: &str = "Unable to create project right now. Try again soon.";
pub const DELETE_PROJECT_FAILED: &str = "Unable to delete project from the server. Try again.";
pub const SYNC_FAILED: &str = "Unable to sync with the server. Showing local data.";

pub const OPEN_PROJECT_FIRST: &str = "Open a project before adding tracks.";
pub const UPLOAD_FAILED: &str = "Upload failed. Check your sync settings and try again.";
pub const DELETE_TRACK_FAILED: &str = "Unable to delete the track from the server right now.";

pub const SAVE_PROFILE_FAILED: &str = "We couldn't save your profile. Check your sync settings.";
