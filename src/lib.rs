pub mod form;
pub mod receiver;
pub mod submitter;
pub mod types;

pub use form::{FormUi, HandoffForm, SAVED_LABEL};
pub use receiver::TokenReceiver;
pub use submitter::{RECEIVE_PATH, Submitter};
pub use types::{FormInput, ReceiveAck, SubmitState, TokenPayload};
