//! Client-side board state.
//!
//! One [`DisplayState`] holds the last applied board, the local countdown
//! and the request lifecycle. Callers share it behind a mutex; every
//! transition below is a single `&mut self` call, so checking and setting
//! the in-flight flag happens under one lock.

use lucky_six_core::board::DrawBoard;

use crate::error::DisplayError;

/// Lifecycle of the board request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    InFlight,
    /// The last fetch failed; the message is shown inline.
    Failed(String),
}

/// Permission to run one fetch, handed out by [`DisplayState::begin_fetch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// What [`DisplayState::finish_fetch`] did with a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The board replaced the previous one and reset the countdown.
    Applied,
    /// The fetch failed; the previous board and countdown are kept.
    Failed,
    /// The ticket is not the fetch in flight; the response was dropped.
    Stale,
}

#[derive(Debug)]
pub struct DisplayState {
    board: Option<DrawBoard>,
    countdown: i64,
    request: RequestState,
    /// Last sequence number handed out.
    issued_seq: u64,
    /// Sequence number of the fetch currently in flight.
    in_flight_seq: Option<u64>,
    /// Sequence number of the last applied board.
    applied_seq: u64,
    /// A fetch was asked for while another was in flight.
    refetch_pending: bool,
}

impl DisplayState {
    pub fn new() -> Self {
        Self {
            board: None,
            countdown: 0,
            request: RequestState::Idle,
            issued_seq: 0,
            in_flight_seq: None,
            applied_seq: 0,
            refetch_pending: false,
        }
    }

    pub fn board(&self) -> Option<&DrawBoard> {
        self.board.as_ref()
    }

    /// Seconds left until the next draw, never negative.
    pub fn countdown(&self) -> i64 {
        self.countdown
    }

    pub fn request(&self) -> &RequestState {
        &self.request
    }

    /// Whether a refused fetch is waiting for the current one to finish.
    pub fn refetch_pending(&self) -> bool {
        self.refetch_pending
    }

    /// Start a fetch unless one is already in flight.
    ///
    /// A refused call is remembered; see [`refetch_pending`](Self::refetch_pending).
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if self.request == RequestState::InFlight {
            self.refetch_pending = true;
            return None;
        }
        self.refetch_pending = false;
        self.issued_seq += 1;
        self.in_flight_seq = Some(self.issued_seq);
        self.request = RequestState::InFlight;
        Some(FetchTicket {
            seq: self.issued_seq,
        })
    }

    /// Record the result of the fetch started with `ticket`.
    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<DrawBoard, DisplayError>,
    ) -> FetchOutcome {
        if self.in_flight_seq != Some(ticket.seq) || ticket.seq <= self.applied_seq {
            return FetchOutcome::Stale;
        }
        self.in_flight_seq = None;

        match result {
            Ok(board) => {
                self.countdown = board.time_to_next_draw.max(0);
                self.board = Some(board);
                self.applied_seq = ticket.seq;
                self.request = RequestState::Idle;
                FetchOutcome::Applied
            }
            Err(e) => {
                self.request = RequestState::Failed(e.to_string());
                FetchOutcome::Failed
            }
        }
    }

    /// One second passed.
    pub fn tick(&mut self) {
        self.countdown = (self.countdown - 1).max(0);
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}
