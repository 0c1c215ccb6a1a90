pub mod control_panel;
pub mod input_bar;
pub mod message_list;

pub use control_panel::ControlPanel;
pub use input_bar::InputBar;
pub use message_list::MessageList;
