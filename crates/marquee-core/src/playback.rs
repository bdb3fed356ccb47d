//! Playback controller: gates whether the loop clock advances.
//!
//! ```text
//! Stopped --start--> Running --pause--> Paused --resume--> Running
//!    ^                                                        |
//!    +--------------------------- stop -----------------------+
//! ```
//!
//! Hover handling is a policy on top: it only toggles Running and Paused and
//! never moves the controller out of Stopped.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    #[default]
    Stopped,
    Running,
    Paused,
}

impl PlaybackState {
    pub fn label(self) -> &'static str {
        match self {
            PlaybackState::Stopped => "STOPPED",
            PlaybackState::Running => "RUNNING",
            PlaybackState::Paused => "PAUSED",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlaybackController {
    state: PlaybackState,
    pause_on_interaction: bool,
    /// Pointer currently over the region
    hovered: bool,
}

impl PlaybackController {
    pub fn new(pause_on_interaction: bool) -> Self {
        Self {
            state: PlaybackState::Stopped,
            pause_on_interaction,
            hovered: false,
        }
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Only a running controller lets the clock advance
    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == PlaybackState::Running
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Begin moving from Stopped or Paused. Returns true on a transition.
    pub fn start(&mut self) -> bool {
        self.transition(PlaybackState::Running)
    }

    /// Running -> Paused
    pub fn pause(&mut self) -> bool {
        if self.state == PlaybackState::Running {
            self.transition(PlaybackState::Paused)
        } else {
            false
        }
    }

    /// Paused -> Running
    pub fn resume(&mut self) -> bool {
        if self.state == PlaybackState::Paused {
            self.transition(PlaybackState::Running)
        } else {
            false
        }
    }

    pub fn stop(&mut self) -> bool {
        self.transition(PlaybackState::Stopped)
    }

    pub fn set_pause_on_interaction(&mut self, enabled: bool) {
        self.pause_on_interaction = enabled;
        if !enabled {
            self.hovered = false;
        }
    }

    pub fn pause_on_interaction(&self) -> bool {
        self.pause_on_interaction
    }

    pub fn pointer_enter(&mut self) -> bool {
        if !self.pause_on_interaction {
            return false;
        }
        self.hovered = true;
        self.pause()
    }

    pub fn pointer_leave(&mut self) -> bool {
        if !self.pause_on_interaction {
            return false;
        }
        self.hovered = false;
        self.resume()
    }

    fn transition(&mut self, next: PlaybackState) -> bool {
        if self.state == next {
            return false;
        }
        self.state = next;
        true
    }
}
