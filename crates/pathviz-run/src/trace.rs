//! Buffered run traces for replay.
//!
//! A [`Trace`] holds the complete event stream of one run, so a consumer can
//! animate it at its own pace or step backwards. [`TraceEncoder`] and
//! [`TraceDecoder`] persist traces to a byte stream in a compact binary
//! format.
//!
//! ## Wire format
//!
//! ```text
//! [rows: i32 LE] [cols: i32 LE] [algorithm: u8]
//! then one record per event:
//!   [tag: u8]
//!   tag 0, frontier: [row: i32 LE] [col: i32 LE] [priority: i32 LE]
//!   tag 1, visited:  [row: i32 LE] [col: i32 LE]
//!   tag 2, result:   [outcome: u8] [visited_count: u64 LE] [path_len: u32 LE]
//!                    path_len x ([row: i32 LE] [col: i32 LE])
//! ```

use std::io::{self, Read, Write};

use pathviz_core::{Point, Range};
use pathviz_paths::Algorithm;

use crate::event::{Outcome, RunEvent, RunResult};

const TAG_FRONTIER: u8 = 0;
const TAG_VISITED: u8 = 1;
const TAG_RESULT: u8 = 2;

const OUTCOME_FOUND: u8 = 0;
const OUTCOME_NOT_FOUND: u8 = 1;
const OUTCOME_CANCELLED: u8 = 2;

// ---------------------------------------------------------------------------
// Trace
// ---------------------------------------------------------------------------

/// The recorded event stream of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trace {
    algorithm: Algorithm,
    bounds: Range,
    events: Vec<RunEvent>,
}

impl Trace {
    pub fn new(algorithm: Algorithm, bounds: Range, events: Vec<RunEvent>) -> Self {
        Self {
            algorithm,
            bounds,
            events,
        }
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Dimensions of the grid the run searched.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn events(&self) -> &[RunEvent] {
        &self.events
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The terminal result, if the stream is complete.
    pub fn result(&self) -> Option<&RunResult> {
        match self.events.last() {
            Some(RunEvent::RunResult(r)) => Some(r),
            _ => None,
        }
    }

    /// Settled positions in exploration order.
    pub fn visited(&self) -> impl Iterator<Item = Point> + '_ {
        self.events.iter().filter_map(|e| match e {
            RunEvent::NodeVisited { pos } => Some(*pos),
            _ => None,
        })
    }

    /// Events up to and including the `n`-th settled node, for scrubbing
    /// through a replay.
    pub fn until_visited(&self, n: usize) -> &[RunEvent] {
        if n == 0 {
            return &[];
        }
        let mut seen = 0;
        for (i, e) in self.events.iter().enumerate() {
            if matches!(e, RunEvent::NodeVisited { .. }) {
                seen += 1;
                if seen == n {
                    // The frontier pushes that follow belong to this step.
                    let end = self.events[i + 1..]
                        .iter()
                        .position(|e| !matches!(e, RunEvent::NodeFrontier { .. }))
                        .map_or(self.events.len(), |k| i + 1 + k);
                    return &self.events[..end];
                }
            }
        }
        &self.events
    }

    /// Write the whole trace with a [`TraceEncoder`].
    pub fn write_to<W: Write>(&self, writer: W) -> io::Result<()> {
        let mut enc = TraceEncoder::new(writer, self.algorithm, self.bounds)?;
        for e in &self.events {
            enc.encode(e)?;
        }
        enc.flush()
    }

    /// Read a trace written by [`write_to`](Self::write_to).
    pub fn read_from<R: Read>(reader: R) -> io::Result<Self> {
        let mut dec = TraceDecoder::new(reader)?;
        let mut events = Vec::new();
        while let Some(e) = dec.decode()? {
            events.push(e);
        }
        Ok(Self::new(dec.algorithm(), dec.bounds(), events))
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a RunEvent;
    type IntoIter = std::slice::Iter<'a, RunEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

// ---------------------------------------------------------------------------
// TraceEncoder
// ---------------------------------------------------------------------------

/// Encodes [`RunEvent`]s to a byte-oriented writer.
pub struct TraceEncoder<W: Write> {
    writer: W,
}

impl<W: Write> TraceEncoder<W> {
    /// Wrap a writer and emit the trace header.
    pub fn new(mut writer: W, algorithm: Algorithm, bounds: Range) -> io::Result<Self> {
        writer.write_all(&bounds.height().to_le_bytes())?;
        writer.write_all(&bounds.width().to_le_bytes())?;
        writer.write_all(&[algorithm_tag(algorithm)])?;
        Ok(Self { writer })
    }

    /// Write a single event.
    pub fn encode(&mut self, event: &RunEvent) -> io::Result<()> {
        match event {
            RunEvent::NodeFrontier { pos, priority } => {
                self.writer.write_all(&[TAG_FRONTIER])?;
                self.write_point(*pos)?;
                self.writer.write_all(&priority.to_le_bytes())?;
            }
            RunEvent::NodeVisited { pos } => {
                self.writer.write_all(&[TAG_VISITED])?;
                self.write_point(*pos)?;
            }
            RunEvent::RunResult(result) => {
                self.writer.write_all(&[TAG_RESULT])?;
                let (tag, path) = match &result.outcome {
                    Outcome::Found(path) => (OUTCOME_FOUND, path.as_slice()),
                    Outcome::NotFound => (OUTCOME_NOT_FOUND, &[][..]),
                    Outcome::Cancelled => (OUTCOME_CANCELLED, &[][..]),
                };
                self.writer.write_all(&[tag])?;
                self.writer
                    .write_all(&(result.visited_count as u64).to_le_bytes())?;
                self.writer.write_all(&(path.len() as u32).to_le_bytes())?;
                for &p in path {
                    self.write_point(p)?;
                }
            }
        }
        Ok(())
    }

    fn write_point(&mut self, p: Point) -> io::Result<()> {
        self.writer.write_all(&p.row().to_le_bytes())?;
        self.writer.write_all(&p.col().to_le_bytes())
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Consume the encoder, returning the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

// ---------------------------------------------------------------------------
// TraceDecoder
// ---------------------------------------------------------------------------

/// Decodes [`RunEvent`]s from a byte-oriented reader.
pub struct TraceDecoder<R: Read> {
    reader: R,
    algorithm: Algorithm,
    bounds: Range,
}

impl<R: Read> TraceDecoder<R> {
    /// Wrap a reader and consume the trace header.
    pub fn new(mut reader: R) -> io::Result<Self> {
        let rows = read_i32(&mut reader)?;
        let cols = read_i32(&mut reader)?;
        if rows < 0 || cols < 0 {
            return Err(invalid(format!("invalid trace dimensions {rows}x{cols}")));
        }
        let algorithm = match read_u8(&mut reader)? {
            0 => Algorithm::Dijkstra,
            1 => Algorithm::AStar,
            2 => Algorithm::BidirectionalDijkstra,
            tag => return Err(invalid(format!("unknown algorithm tag {tag}"))),
        };
        Ok(Self {
            reader,
            algorithm,
            bounds: Range::with_size(rows, cols),
        })
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Read the next event, or `None` at EOF.
    pub fn decode(&mut self) -> io::Result<Option<RunEvent>> {
        let mut tag = [0u8; 1];
        match self.reader.read_exact(&mut tag) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
            Err(e) => return Err(e),
        }
        let event = match tag[0] {
            TAG_FRONTIER => {
                let pos = self.read_point()?;
                let priority = read_i32(&mut self.reader)?;
                RunEvent::NodeFrontier { pos, priority }
            }
            TAG_VISITED => RunEvent::NodeVisited {
                pos: self.read_point()?,
            },
            TAG_RESULT => {
                let outcome_tag = read_u8(&mut self.reader)?;
                let visited_count = read_u64(&mut self.reader)?;
                let path_len = read_u32(&mut self.reader)? as usize;
                if path_len > self.bounds.len() {
                    return Err(invalid(format!(
                        "path of {path_len} cells on a {} grid",
                        self.bounds
                    )));
                }
                let mut path = Vec::with_capacity(path_len);
                for _ in 0..path_len {
                    path.push(self.read_point()?);
                }
                let outcome = match outcome_tag {
                    OUTCOME_FOUND => Outcome::Found(path),
                    OUTCOME_NOT_FOUND => Outcome::NotFound,
                    OUTCOME_CANCELLED => Outcome::Cancelled,
                    t => return Err(invalid(format!("unknown outcome tag {t}"))),
                };
                RunEvent::RunResult(RunResult {
                    outcome,
                    visited_count: visited_count as usize,
                })
            }
            t => return Err(invalid(format!("unknown event tag {t}"))),
        };
        Ok(Some(event))
    }

    fn read_point(&mut self) -> io::Result<Point> {
        let row = read_i32(&mut self.reader)?;
        let col = read_i32(&mut self.reader)?;
        Ok(Point::at(row, col))
    }

    /// Consume the decoder, returning the inner reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

fn algorithm_tag(algorithm: Algorithm) -> u8 {
    match algorithm {
        Algorithm::Dijkstra => 0,
        Algorithm::AStar => 1,
        Algorithm::BidirectionalDijkstra => 2,
    }
}

fn invalid(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

fn read_u8(r: &mut impl Read) -> io::Result<u8> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

fn read_i32(r: &mut impl Read) -> io::Result<i32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

fn read_u32(r: &mut impl Read) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_u64(r: &mut impl Read) -> io::Result<u64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Trace {
        let events = vec![
            RunEvent::NodeVisited { pos: Point::at(0, 0) },
            RunEvent::NodeFrontier {
                pos: Point::at(0, 1),
                priority: 1,
            },
            RunEvent::NodeFrontier {
                pos: Point::at(1, 0),
                priority: 1,
            },
            RunEvent::NodeVisited { pos: Point::at(0, 1) },
            RunEvent::RunResult(RunResult {
                outcome: Outcome::Found(vec![Point::at(0, 0), Point::at(0, 1)]),
                visited_count: 2,
            }),
        ];
        Trace::new(Algorithm::AStar, Range::with_size(2, 3), events)
    }

    #[test]
    fn accessors() {
        let t = sample();
        assert_eq!(t.len(), 5);
        assert_eq!(t.result().map(|r| r.visited_count), Some(2));
        assert_eq!(
            t.visited().collect::<Vec<_>>(),
            vec![Point::at(0, 0), Point::at(0, 1)]
        );
        assert_eq!((&t).into_iter().count(), 5);
    }

    #[test]
    fn until_visited_includes_the_step_pushes() {
        let t = sample();
        assert!(t.until_visited(0).is_empty());
        assert_eq!(t.until_visited(1).len(), 3);
        assert_eq!(t.until_visited(2).len(), 4);
        assert_eq!(t.until_visited(9).len(), 5);
    }

    #[test]
    fn binary_round_trip() {
        let t = sample();
        let mut buf = Vec::new();
        t.write_to(&mut buf).unwrap();
        let back = Trace::read_from(buf.as_slice()).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn cancelled_result_round_trip() {
        let t = Trace::new(
            Algorithm::BidirectionalDijkstra,
            Range::with_size(4, 4),
            vec![RunEvent::RunResult(RunResult {
                outcome: Outcome::Cancelled,
                visited_count: 3,
            })],
        );
        let mut buf = Vec::new();
        t.write_to(&mut buf).unwrap();
        assert_eq!(Trace::read_from(buf.as_slice()).unwrap(), t);
    }

    #[test]
    fn rejects_unknown_tags() {
        let mut buf = Vec::new();
        TraceEncoder::new(&mut buf, Algorithm::Dijkstra, Range::with_size(1, 1)).unwrap();
        buf.push(9);
        let mut dec = TraceDecoder::new(buf.as_slice()).unwrap();
        let err = dec.decode().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        let bad_header = [1u8, 0, 0, 0, 1, 0, 0, 0, 7];
        assert!(TraceDecoder::new(&bad_header[..]).is_err());
    }

    #[test]
    fn truncated_header_is_an_error() {
        assert!(Trace::read_from(&[0u8, 0][..]).is_err());
    }
}
