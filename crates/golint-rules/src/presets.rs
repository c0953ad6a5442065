//! The default rule set.

use crate::{
    ExportedFuncDoc, ExportedTypeDoc, ExportedValueDoc, NameStutter, Names, PackageComment,
    ReceiverNames,
};
use golint_core::RuleBox;

/// Returns every built-in rule, in evaluation order.
///
/// The order only affects the order in which problems reach the
/// collector; reports are sorted by position afterwards.
#[must_use]
pub fn default_rules() -> Vec<RuleBox> {
    vec![
        Box::new(PackageComment::new()),
        Box::new(ExportedTypeDoc::new()),
        Box::new(ExportedFuncDoc::new()),
        Box::new(ExportedValueDoc::new()),
        Box::new(NameStutter::new()),
        Box::new(Names::new()),
        Box::new(ReceiverNames::new()),
    ]
}
