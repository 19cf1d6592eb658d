mod locator;

pub use locator::Locator;
