use docket_types::types::County;

use super::CaseExtractor;

/// Travis County JP courts: the reference layout.
#[derive(Debug, Default, Clone, Copy)]
pub struct TravisExtractor;

impl CaseExtractor for TravisExtractor {
    fn county(&self) -> County {
        County::Travis
    }
}
