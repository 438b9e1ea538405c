//! Request generation tokens.
//!
//! Requests are never cancelled, so an older response can arrive after a
//! newer one. Every request takes a [`Ticket`] from its channel; when the
//! response arrives it is applied only if that ticket is still the
//! channel's latest.

use std::collections::HashMap;

/// Independent request streams. A new request supersedes only older
/// requests of the same channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    StationNames,
    MapData,
    Thresholds,
    ParameterOptions,
    Details,
    Chart,
    Comparison,
    Prediction,
    Averages,
    StationMeans,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    channel: Channel,
    generation: u64,
}

impl Ticket {
    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Default)]
pub struct Generations {
    latest: HashMap<Channel, u64>,
}

impl Generations {
    /// Issue a ticket that supersedes every earlier ticket of `channel`.
    pub fn issue(&mut self, channel: Channel) -> Ticket {
        let generation = self.latest.entry(channel).or_insert(0);
        *generation += 1;
        Ticket {
            channel,
            generation: *generation,
        }
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.get(&ticket.channel) == Some(&ticket.generation)
    }

    /// Supersede any in-flight request of `channel` without starting a new one.
    pub fn invalidate(&mut self, channel: Channel) {
        self.issue(channel);
    }
}
