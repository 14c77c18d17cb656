pub mod device;
pub mod event;
pub mod handler;
pub mod packet;

pub use device::{PointerDevice, PointerFeedback};
pub use event::{EventClass, EventQueue, EventSender, InputEvent, Subscriptions};
pub use handler::{InputHandler, KeyAction};
pub use packet::{encode_motion, PacketFramer, PointerSample};
