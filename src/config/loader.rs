//! `[loader]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[loader]` section - how computational data sources are run.
///
/// A data source `people` is first looked up as the script
/// `people.<script_extension>`, executed as `<interpreter...> people.sh`.
/// Its standard output must be JSON.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct LoaderConfig {
    /// Extension of script data sources, without the dot.
    #[serde(default = "defaults::loader::script_extension")]
    #[educe(Default = defaults::loader::script_extension())]
    pub script_extension: String,

    /// Interpreter command and arguments; the script path is appended.
    #[serde(default = "defaults::loader::interpreter")]
    #[educe(Default = defaults::loader::interpreter())]
    pub interpreter: Vec<String>,
}
