// Landing builder: the property store behind the canvas's visual elements.
// The canvas itself (placement, drag and drop) lives in the browser.

pub mod element;
pub mod handlers;
pub mod store;

pub use store::LayoutStore;
