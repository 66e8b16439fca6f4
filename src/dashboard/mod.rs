pub mod aggregator;
pub mod amenity;
pub mod facade;
pub mod state;

pub use aggregator::project_rooms;
pub use amenity::{Amenity, parse_amenity};
pub use facade::Dashboard;
pub use state::DashboardFilter;
