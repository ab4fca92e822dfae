use core::fmt;

use thiserror::Error;

use crate::parser::{OutputProperties, ParseError, parse_status};
use crate::types::{Action, ActiveMode, Resolution};

/// Error type for the topology module
#[derive(Error, Debug)]
pub enum TopologyError {
    #[error("Error while parsing the status report")]
    Parse(#[from] ParseError),
    #[error("Output {0} is not connected")]
    NotConnected(String),
    #[error("Output {0} is the last active output")]
    LastActiveOutput(String),
}

type Result<T = ()> = std::result::Result<T, TopologyError>;

/// A struct that represents an output (index) within a topology
#[derive(Debug, Clone)]
pub struct Output<'a> {
    /// The index of the output in the topology
    index: usize,
    /// The topology containing this output
    topology: &'a Topology,
}

impl Output<'_> {
    pub fn index(&self) -> usize {
        self.index
    }

    fn properties(&self) -> &OutputProperties {
        &self.topology.outputs[self.index]
    }

    pub fn name(&self) -> &str {
        self.properties().name.as_str()
    }

    pub fn is_connected(&self) -> bool {
        self.properties().connected
    }

    pub fn is_active(&self) -> bool {
        self.properties().active.get()
    }

    /// The mode currently driving this output, if it is active
    pub fn current_mode(&self) -> Option<ActiveMode> {
        *self.properties().current_mode.borrow()
    }

    /// The resolutions this output supports, in the order reported
    pub fn modes(&self) -> &[Resolution] {
        &self.properties().modes
    }

    /// Returns the actions that can be performed on this output
    ///
    /// Active outputs can be deactivated and, when more than one mode is
    /// reported, switched to another resolution. Inactive outputs can be
    /// activated; the placement is chosen during activation.
    pub fn available_actions(&self) -> Result<Vec<Action>> {
        if !self.is_connected() {
            return Err(TopologyError::NotConnected(self.name().to_string()));
        }

        if self.is_active() {
            let mut actions = vec![Action::Deactivate];
            if self.modes().len() > 1 {
                actions.push(Action::ChangeResolution);
            }
            Ok(actions)
        } else {
            Ok(vec![Action::Activate])
        }
    }

    /// Rejects deactivation of the only active output
    ///
    /// Checked before any external command is issued, so a refusal never
    /// leaves the session without a display.
    pub fn ensure_can_deactivate(&self) -> Result {
        if self.is_active() && self.topology.active_outputs().count() == 1 {
            return Err(TopologyError::LastActiveOutput(self.name().to_string()));
        }
        Ok(())
    }

    /// The menu label for performing `action` on this output
    pub fn describe_action(&self, action: Action) -> String {
        match action {
            Action::Activate => format!("Activate {}", self.name()),
            Action::Deactivate => format!("Deactivate {}", self.name()),
            Action::ChangeResolution => {
                let mode = self
                    .current_mode()
                    .map_or_else(|| "auto".to_string(), |mode| mode.to_string());
                format!("Change resolution of {} ({})", self.name(), mode)
            }
        }
    }

    /// Records a successful activation; the negotiated mode is unknown until
    /// the next status query
    pub(crate) fn record_activated(&self) {
        let properties = self.properties();
        properties.active.set(true);
        *properties.current_mode.borrow_mut() = Some(ActiveMode::Auto);
    }

    /// Records a successful deactivation
    pub(crate) fn record_deactivated(&self) {
        let properties = self.properties();
        properties.active.set(false);
        *properties.current_mode.borrow_mut() = None;
    }

    /// Records a successful resolution change
    pub(crate) fn record_mode(&self, resolution: Resolution) {
        let properties = self.properties();
        properties.active.set(true);
        *properties.current_mode.borrow_mut() = Some(ActiveMode::Mode(resolution));
    }
}

/// A struct that represents the set of outputs discovered in one status query
#[derive(Debug)]
pub struct Topology {
    /// The outputs in this topology, in discovery order
    outputs: Vec<OutputProperties>,
}

impl Topology {
    /// Builds a topology from the status report of `xrandr --query`
    pub fn from_status(text: &str) -> Result<Self> {
        Ok(Self {
            outputs: parse_status(text)?,
        })
    }

    /// Iterates over the outputs in this topology
    pub fn outputs(&self) -> impl ExactSizeIterator<Item = Output<'_>> {
        self.outputs.iter().enumerate().map(|(index, _)| Output {
            index,
            topology: self,
        })
    }

    /// Returns the output for the given `index`
    pub fn get(&self, index: usize) -> Option<Output<'_>> {
        if index >= self.outputs.len() {
            return None;
        }
        Some(Output {
            index,
            topology: self,
        })
    }

    /// Returns the output with the given `name`
    pub fn find(&self, name: &str) -> Option<Output<'_>> {
        self.outputs().find(|output| output.name() == name)
    }

    /// The physically connected outputs, in discovery order
    pub fn connected_outputs(&self) -> impl Iterator<Item = Output<'_>> {
        self.outputs().filter(Output::is_connected)
    }

    /// The currently active outputs, in discovery order
    pub fn active_outputs(&self) -> impl Iterator<Item = Output<'_>> {
        self.outputs().filter(Output::is_active)
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Topology {{ outputs: [")?;
        for (i, output) in self.outputs.iter().enumerate() {
            if i > 0 {
                writeln!(f, ", ")?;
            }
            write!(f, "    {}", output)?;
        }
        write!(f, "\n] }}")
    }
}
