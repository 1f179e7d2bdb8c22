mod init;
mod search;
mod serve;

pub use init::init_config;
pub use search::{search_image, SearchArgs};
pub use serve::serve;
