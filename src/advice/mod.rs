pub mod debug;
pub mod generator;
pub mod markup;
pub mod prompts;

pub use generator::AdviceGenerator;
pub use markup::loader_html;
