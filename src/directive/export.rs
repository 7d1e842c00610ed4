use crate::error::IncludeError;
use crate::host::{ExportRegistry, MessageSink};
use crate::message::Message;
use crate::policy::{PolicyAction, PolicyId, PolicyStore, export_include_action, policy_warning};
use std::path::Path;

fn export_file_text(path: &Path, modal: &str) -> String {
    format!(
        "The file\n  {}\nwas generated by the export() command.  It {modal} not be used as the \
         argument to the include() command.  Use ALIAS targets instead to refer to targets by \
         alternative names.\n",
        path.display()
    )
}

/// Apply the export-file policy to `path` before it is loaded.
///
/// Files the build graph registered as `export()` results are regenerated
/// before anything else happens to them, including when the policy then
/// rejects the include.
pub fn check_export_file<H>(host: &mut H, path: &Path) -> Result<(), IncludeError>
where
    H: ExportRegistry + PolicyStore + MessageSink + ?Sized,
{
    if !host.is_exported_targets_file(path) {
        return Ok(());
    }

    let status = host.policy_status(PolicyId::Cmp0024);
    let action = export_include_action(status);
    tracing::debug!(path = %path.display(), %status, ?action, "including an export() result");

    match action {
        PolicyAction::Proceed => {
            host.materialize_and_generate(path);
            Ok(())
        }
        PolicyAction::Warn => {
            let text = format!(
                "{}\n{}",
                policy_warning(PolicyId::Cmp0024),
                export_file_text(path, "should")
            );
            tracing::warn!("{text}");
            host.report(Message::author_warning(text));
            host.materialize_and_generate(path);
            Ok(())
        }
        PolicyAction::Abort => {
            host.materialize_and_generate(path);
            host.report(Message::fatal_error(export_file_text(path, "may")));
            Err(IncludeError::ExportFilePolicy {
                path: path.to_path_buf(),
            })
        }
    }
}
