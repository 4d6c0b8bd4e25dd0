// crates/test-utils/src/fake_supervisor.rs

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use autoupconvert::errors::{Result, UpconvertError};
use autoupconvert::exec::{BoxFuture, LaunchSpec, ProcessSupervisor, SupervisedProcess};
use autoupconvert::types::OutputLine;

type StartHook = Arc<dyn Fn(&LaunchSpec) + Send + Sync>;

/// What a fake converter does when started.
#[derive(Clone, Default)]
pub struct Script {
    lines: Vec<OutputLine>,
    exit_code: Option<i32>,
    fail_launch: bool,
    on_start: Option<StartHook>,
}

impl Script {
    pub fn new() -> Self {
        Self {
            exit_code: Some(0),
            ..Self::default()
        }
    }

    pub fn stdout(mut self, text: &str) -> Self {
        self.lines.push(OutputLine::stdout(text));
        self
    }

    pub fn stderr(mut self, text: &str) -> Self {
        self.lines.push(OutputLine::stderr(text));
        self
    }

    pub fn exit_code(mut self, code: i32) -> Self {
        self.exit_code = Some(code);
        self
    }

    /// Make `start` fail as if the executable could not be launched.
    pub fn fail_launch(mut self) -> Self {
        self.fail_launch = true;
        self
    }

    /// Run `hook` at launch time, e.g. to drop output files into a mock
    /// filesystem the way the real converter would.
    pub fn on_start(mut self, hook: impl Fn(&LaunchSpec) + Send + Sync + 'static) -> Self {
        self.on_start = Some(Arc::new(hook));
        self
    }
}

/// Events recorded by [`ScriptedSupervisor`], in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupervisorEvent {
    Started(String),
    Killed(String),
    Waited(String),
}

/// A `ProcessSupervisor` that replays per-converter scripts.
///
/// Converters without a script print nothing and exit with code 0.
#[derive(Clone, Default)]
pub struct ScriptedSupervisor {
    scripts: Arc<Mutex<HashMap<String, Script>>>,
    events: Arc<Mutex<Vec<SupervisorEvent>>>,
    launches: Arc<Mutex<Vec<LaunchSpec>>>,
}

impl ScriptedSupervisor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&self, converter: &str, script: Script) {
        self.scripts
            .lock()
            .unwrap()
            .insert(converter.to_string(), script);
    }

    pub fn events(&self) -> Vec<SupervisorEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn launches(&self) -> Vec<LaunchSpec> {
        self.launches.lock().unwrap().clone()
    }

    pub fn started(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SupervisorEvent::Started(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn was_killed(&self, converter: &str) -> bool {
        self.events()
            .iter()
            .any(|e| matches!(e, SupervisorEvent::Killed(name) if name == converter))
    }
}

impl ProcessSupervisor for ScriptedSupervisor {
    fn start(&self, spec: &LaunchSpec) -> Result<Box<dyn SupervisedProcess>> {
        let script = self
            .scripts
            .lock()
            .unwrap()
            .get(&spec.name)
            .cloned()
            .unwrap_or_else(Script::new);

        if script.fail_launch {
            return Err(UpconvertError::ConverterLaunch {
                converter: spec.name.clone(),
                message: "scripted launch failure".to_string(),
            });
        }

        self.launches.lock().unwrap().push(spec.clone());
        self.events
            .lock()
            .unwrap()
            .push(SupervisorEvent::Started(spec.name.clone()));

        if let Some(hook) = &script.on_start {
            hook(spec);
        }

        Ok(Box::new(ScriptedProcess {
            name: spec.name.clone(),
            lines: script.lines.into_iter().collect(),
            exit_code: script.exit_code,
            killed: false,
            events: Arc::clone(&self.events),
        }))
    }
}

struct ScriptedProcess {
    name: String,
    lines: VecDeque<OutputLine>,
    exit_code: Option<i32>,
    killed: bool,
    events: Arc<Mutex<Vec<SupervisorEvent>>>,
}

impl SupervisedProcess for ScriptedProcess {
    fn next_line(&mut self) -> BoxFuture<'_, Option<OutputLine>> {
        Box::pin(async move {
            if self.killed {
                return None;
            }
            self.lines.pop_front()
        })
    }

    fn kill(&mut self) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            self.killed = true;
            self.events
                .lock()
                .unwrap()
                .push(SupervisorEvent::Killed(self.name.clone()));
            Ok(())
        })
    }

    fn wait(&mut self) -> BoxFuture<'_, Result<Option<i32>>> {
        Box::pin(async move {
            self.events
                .lock()
                .unwrap()
                .push(SupervisorEvent::Waited(self.name.clone()));
            Ok(if self.killed { None } else { self.exit_code })
        })
    }
}
