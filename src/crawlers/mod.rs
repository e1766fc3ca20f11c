pub mod engine;
pub mod renderer;
pub mod web;


pub use engine::{CrawlSession, Crawler};
pub use renderer::{PageRenderer, RenderedPage};
pub use web::WebDriverRenderer;
