mod backend;
mod document;
mod error;
mod feedback;
mod message;
mod sender;
mod settings;
mod stage;

pub use backend::*;
pub use document::*;
pub use error::*;
pub use feedback::*;
pub use message::*;
pub use sender::*;
pub use settings::*;
pub use stage::*;
