mod error;
mod operations;
mod requests;
mod sorting;
mod transitions;
mod types;

pub use error::ValidationError;
pub use operations::{
    is_strong_password, is_valid_email, is_valid_name, validate_background_color,
    validate_label_name, validate_new_note, validate_note_update, validate_password,
    validate_registration, MIN_PASSWORD_LEN,
};
pub use requests::{
    CollaboratorRequest, CreateNoteRequest, LoginRequest, RegisterUserRequest,
    UpdateLabelRequest, UpdateNoteRequest,
};
pub use sorting::{archived_notes, merge_notes, pinned_notes, sort_notes_newest_first};
pub use transitions::{apply_action, NoteAction};
pub use types::{
    Collaborator, Label, LabelNote, NewCollaborator, NewLabel, NewNote, NewUser, Note, User,
    UserProfile, DEFAULT_BACKGROUND_COLOR,
};
