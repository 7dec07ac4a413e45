use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use hybrid_polisher::errors::Result;
use hybrid_polisher::exec::{ExecutorBackend, ExitReport, PreparedCommand};
use hybrid_polisher::fs::FileSystem;
use hybrid_polisher::fs::mock::MockFileSystem;
use hybrid_polisher::tools::ToolKind;

/// A fake executor that:
/// - records every prepared command it is handed
/// - writes each declared output into a shared `MockFileSystem`
///   (except outputs registered with [`FakeExecutor::skip_output`])
/// - reports exit status 0 unless a tool was registered with
///   [`FakeExecutor::fail_tool`].
///
/// Clones share state, so keep one clone in the test and move the other
/// into the executor.
#[derive(Debug, Clone)]
pub struct FakeExecutor {
    fs: MockFileSystem,
    calls: Arc<Mutex<Vec<PreparedCommand>>>,
    skipped: Arc<Mutex<HashSet<PathBuf>>>,
    exit_codes: Arc<Mutex<HashMap<ToolKind, i32>>>,
}

impl FakeExecutor {
    pub fn new(fs: MockFileSystem) -> Self {
        Self {
            fs,
            calls: Arc::new(Mutex::new(Vec::new())),
            skipped: Arc::new(Mutex::new(HashSet::new())),
            exit_codes: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Never materialise `path`, as if the tool silently failed to write it.
    pub fn skip_output(&self, path: impl AsRef<Path>) {
        self.skipped
            .lock()
            .unwrap()
            .insert(path.as_ref().to_path_buf());
    }

    /// Make every invocation of `tool` exit with `code`.
    pub fn fail_tool(&self, tool: ToolKind, code: i32) {
        self.exit_codes.lock().unwrap().insert(tool, code);
    }

    pub fn calls(&self) -> Vec<PreparedCommand> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, tool: ToolKind) -> Vec<PreparedCommand> {
        self.calls()
            .into_iter()
            .filter(|c| c.tool == tool)
            .collect()
    }

    pub fn argvs(&self) -> Vec<Vec<String>> {
        self.calls().into_iter().map(|c| c.argv).collect()
    }
}

impl ExecutorBackend for FakeExecutor {
    fn execute(
        &mut self,
        cmd: PreparedCommand,
    ) -> Pin<Box<dyn Future<Output = Result<ExitReport>> + Send + '_>> {
        let fs = self.fs.clone();
        let calls = Arc::clone(&self.calls);
        let skipped = Arc::clone(&self.skipped);
        let exit_codes = Arc::clone(&self.exit_codes);

        Box::pin(async move {
            let code = exit_codes.lock().unwrap().get(&cmd.tool).copied().unwrap_or(0);

            {
                let skipped = skipped.lock().unwrap();
                for output in cmd.outputs.iter().filter(|o| !skipped.contains(*o)) {
                    fs.write(output, b"fake")?;
                }
            }

            let report = ExitReport {
                tool: cmd.tool,
                code: Some(code),
            };
            calls.lock().unwrap().push(cmd);
            Ok(report)
        })
    }
}
