mod crewmate;
pub use crewmate::*;

mod emergency;
pub use emergency::*;

mod stars;
pub use stars::*;

mod dashboard;
pub use dashboard::*;
