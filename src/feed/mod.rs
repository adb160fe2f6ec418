pub mod assembler;
pub mod builder;
pub mod dates;
pub mod settings;

pub use assembler::FeedAssembler;
pub use builder::build_feed;
pub use settings::ChannelSettings;
