//! Tokio runtime held in scenario state so synchronous steps can drive the
//! async catalog gateway and the mock catalog server.

use std::io;
use std::rc::Rc;

use rstest_bdd::Slot;
use tokio::runtime::Runtime;
use wiremock::MockServer;

/// Runtime handle stored in a [`Slot`]; clones share one runtime.
#[derive(Clone)]
pub(crate) struct ScenarioRuntime(Rc<Runtime>);

impl ScenarioRuntime {
    /// Runs `future` to completion on the scenario runtime.
    pub(crate) fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.0.block_on(future)
    }
}

/// Starts the runtime and the mock catalog server the first time a step
/// needs them, then hands back the runtime.
pub(crate) fn start_catalog(
    runtime: &Slot<ScenarioRuntime>,
    server: &Slot<MockServer>,
) -> Result<ScenarioRuntime, io::Error> {
    let scenario_runtime = match runtime.get() {
        Some(existing) => existing,
        None => {
            let started = ScenarioRuntime(Rc::new(Runtime::new()?));
            runtime.set(started.clone());
            started
        }
    };

    if server.with_ref(MockServer::uri).is_none() {
        server.set(scenario_runtime.block_on(MockServer::start()));
    }
    Ok(scenario_runtime)
}
