mod common;
pub use self::common::{split_date_range, DateRange, Query};

mod filing;
pub use self::filing::FilingQuery;

mod settings;
pub use self::settings::SettingsQuery;
