// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::problem::{
    position::PositionIdentifier, station::StationIdentifier, stopover::StopoverIdentifier,
};
use std::num::ParseIntError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZeroDepthError {
    id: PositionIdentifier,
}

impl ZeroDepthError {
    pub fn new(id: PositionIdentifier) -> Self {
        Self { id }
    }

    pub fn id(&self) -> PositionIdentifier {
        self.id
    }
}

impl std::fmt::Display for ZeroDepthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Position {} has depth zero", self.id)
    }
}

impl std::error::Error for ZeroDepthError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PositionError {
    ZeroDepth(ZeroDepthError),
}

impl std::fmt::Display for PositionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PositionError::ZeroDepth(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PositionError {}

impl From<ZeroDepthError> for PositionError {
    fn from(err: ZeroDepthError) -> Self {
        PositionError::ZeroDepth(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MissingOriginError {
    id: StopoverIdentifier,
}

impl MissingOriginError {
    pub fn new(id: StopoverIdentifier) -> Self {
        Self { id }
    }

    pub fn id(&self) -> StopoverIdentifier {
        self.id
    }
}

impl std::fmt::Display for MissingOriginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Stopover {} records an arrival time but no origin station",
            self.id
        )
    }
}

impl std::error::Error for MissingOriginError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StopoverError {
    MissingOrigin(MissingOriginError),
}

impl std::fmt::Display for StopoverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopoverError::MissingOrigin(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for StopoverError {}

impl From<MissingOriginError> for StopoverError {
    fn from(err: MissingOriginError) -> Self {
        StopoverError::MissingOrigin(err)
    }
}

/// A flexible stopover for which no slot yields a non-empty occupancy
/// window. The instance cannot be solved around this; assembly aborts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmptyFeasibleSetError {
    id: StopoverIdentifier,
}

impl EmptyFeasibleSetError {
    pub fn new(id: StopoverIdentifier) -> Self {
        Self { id }
    }

    pub fn id(&self) -> StopoverIdentifier {
        self.id
    }
}

impl std::fmt::Display for EmptyFeasibleSetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "No feasible storage position for stopover {}", self.id)
    }
}

impl std::error::Error for EmptyFeasibleSetError {}

/// A pinned stopover whose required slot is unreachable under its own
/// timing data. Raised at problem construction, never left for the solver
/// to discover as infeasibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InfeasiblePinningError {
    stopover: StopoverIdentifier,
    position: PositionIdentifier,
}

impl InfeasiblePinningError {
    pub fn new(stopover: StopoverIdentifier, position: PositionIdentifier) -> Self {
        Self { stopover, position }
    }

    pub fn stopover(&self) -> StopoverIdentifier {
        self.stopover
    }

    pub fn position(&self) -> PositionIdentifier {
        self.position
    }
}

impl std::fmt::Display for InfeasiblePinningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Initial storage position {} is out of reach for pinned stopover {}",
            self.position, self.stopover
        )
    }
}

impl std::error::Error for InfeasiblePinningError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnknownPositionError {
    stopover: StopoverIdentifier,
    position: PositionIdentifier,
}

impl UnknownPositionError {
    pub fn new(stopover: StopoverIdentifier, position: PositionIdentifier) -> Self {
        Self { stopover, position }
    }

    pub fn stopover(&self) -> StopoverIdentifier {
        self.stopover
    }

    pub fn position(&self) -> PositionIdentifier {
        self.position
    }
}

impl std::fmt::Display for UnknownPositionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Stopover {} references unknown position {}",
            self.stopover, self.position
        )
    }
}

impl std::error::Error for UnknownPositionError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnknownStationError {
    stopover: StopoverIdentifier,
    station: StationIdentifier,
}

impl UnknownStationError {
    pub fn new(stopover: StopoverIdentifier, station: StationIdentifier) -> Self {
        Self { stopover, station }
    }

    pub fn stopover(&self) -> StopoverIdentifier {
        self.stopover
    }

    pub fn station(&self) -> StationIdentifier {
        self.station
    }
}

impl std::fmt::Display for UnknownStationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Stopover {} references unknown picking station {}",
            self.stopover, self.station
        )
    }
}

impl std::error::Error for UnknownStationError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MissingDistanceError {
    station: StationIdentifier,
    position: PositionIdentifier,
}

impl MissingDistanceError {
    pub fn new(station: StationIdentifier, position: PositionIdentifier) -> Self {
        Self { station, position }
    }

    pub fn station(&self) -> StationIdentifier {
        self.station
    }

    pub fn position(&self) -> PositionIdentifier {
        self.position
    }
}

impl std::fmt::Display for MissingDistanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Distance table has no entry for station {} and position {}",
            self.station, self.position
        )
    }
}

impl std::error::Error for MissingDistanceError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProblemError {
    UnknownPosition(UnknownPositionError),
    UnknownStation(UnknownStationError),
    MissingDistance(MissingDistanceError),
    InfeasiblePinning(InfeasiblePinningError),
}

impl std::fmt::Display for ProblemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProblemError::UnknownPosition(e) => write!(f, "{}", e),
            ProblemError::UnknownStation(e) => write!(f, "{}", e),
            ProblemError::MissingDistance(e) => write!(f, "{}", e),
            ProblemError::InfeasiblePinning(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ProblemError {}

impl From<UnknownPositionError> for ProblemError {
    fn from(err: UnknownPositionError) -> Self {
        ProblemError::UnknownPosition(err)
    }
}

impl From<UnknownStationError> for ProblemError {
    fn from(err: UnknownStationError) -> Self {
        ProblemError::UnknownStation(err)
    }
}

impl From<MissingDistanceError> for ProblemError {
    fn from(err: MissingDistanceError) -> Self {
        ProblemError::MissingDistance(err)
    }
}

impl From<InfeasiblePinningError> for ProblemError {
    fn from(err: InfeasiblePinningError) -> Self {
        ProblemError::InfeasiblePinning(err)
    }
}

#[derive(Debug)]
pub enum ProblemLoaderError {
    Io(std::io::Error),
    ParseInt(ParseIntError),
    UnexpectedEof,
    NonPositiveCounts,
    InvalidReference(String),
    Position(PositionError),
    Stopover(StopoverError),
    Problem(ProblemError),
}

impl From<std::io::Error> for ProblemLoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseIntError> for ProblemLoaderError {
    fn from(e: ParseIntError) -> Self {
        Self::ParseInt(e)
    }
}

impl From<PositionError> for ProblemLoaderError {
    fn from(e: PositionError) -> Self {
        Self::Position(e)
    }
}

impl From<StopoverError> for ProblemLoaderError {
    fn from(e: StopoverError) -> Self {
        Self::Stopover(e)
    }
}

impl From<ProblemError> for ProblemLoaderError {
    fn from(e: ProblemError) -> Self {
        Self::Problem(e)
    }
}

impl std::fmt::Display for ProblemLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ProblemLoaderError::*;
        match self {
            Io(e) => write!(f, "I/O error: {e}"),
            ParseInt(e) => write!(f, "parse-int error: {e}"),
            UnexpectedEof => write!(f, "unexpected end of file while parsing instance"),
            NonPositiveCounts => write!(f, "position and stopover counts must be positive"),
            InvalidReference(what) => write!(f, "invalid reference: {what}"),
            Position(e) => write!(f, "position error: {e}"),
            Stopover(e) => write!(f, "stopover error: {e}"),
            Problem(e) => write!(f, "problem error: {e}"),
        }
    }
}

impl std::error::Error for ProblemLoaderError {}
