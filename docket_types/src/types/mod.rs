mod county;
pub use self::county::County;

mod case;
pub use self::case::{Activity, AttorneyMap, Case, Demographics, Precinct};

mod hearing;
pub use self::hearing::{CaseEvent, CaseEvents, Hearing, Service};

mod disposition;
pub use self::disposition::{Disposition, Resolution, Winner};

mod setting;
pub use self::setting::Setting;
