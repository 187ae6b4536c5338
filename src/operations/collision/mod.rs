mod scan;

pub use scan::{CollisionReport, CollisionSpan, ScanCollisions};
