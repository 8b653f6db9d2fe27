//! Position and rotation notation.
//!
//! Each component is absolute (`12.5`), relative to the current value (`~2`)
//! or local to the current facing (`^1`). Local components only make sense as
//! a full position triple.

use std::fmt;

use voxecute_foundation::{Error, Result, Rotation, Vec3};

use crate::scanner::{Lexicon, Scanner};

/// Lexicon for coordinate text.
pub const VECTOR_LEXICON: Lexicon = Lexicon {
    whitespace: &[' ', '\t'],
    quotes: &[],
    true_words: &[],
    false_words: &[],
    symbols: &[],
};

/// How a component is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CoordKind {
    /// Taken as is.
    Absolute,
    /// Added to the current value (`~`).
    Relative,
    /// Offset along the current facing (`^`).
    Local,
}

/// One component of a position or rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coord {
    /// Interpretation.
    pub kind: CoordKind,
    /// Value or offset.
    pub value: f64,
}

impl Coord {
    /// An absolute component.
    #[must_use]
    pub const fn absolute(value: f64) -> Self {
        Self {
            kind: CoordKind::Absolute,
            value,
        }
    }

    /// A relative component.
    #[must_use]
    pub const fn relative(value: f64) -> Self {
        Self {
            kind: CoordKind::Relative,
            value,
        }
    }

    /// A local component.
    #[must_use]
    pub const fn local(value: f64) -> Self {
        Self {
            kind: CoordKind::Local,
            value,
        }
    }

    fn resolve_against(self, current: f64) -> f64 {
        match self.kind {
            CoordKind::Absolute => self.value,
            CoordKind::Relative | CoordKind::Local => current + self.value,
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            CoordKind::Absolute => return write!(f, "{}", self.value),
            CoordKind::Relative => "~",
            CoordKind::Local => "^",
        };
        f.write_str(prefix)?;
        if self.value != 0.0 {
            write!(f, "{}", self.value)?;
        }
        Ok(())
    }
}

/// Parses a fixed number of components from a scanner.
struct VectorParser<'src> {
    scanner: Scanner<'src>,
}

impl<'src> VectorParser<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            scanner: Scanner::new(source, VECTOR_LEXICON),
        }
    }

    fn component(&mut self, center: bool) -> Result<Coord> {
        let kind = match self.scanner.peek(true) {
            Some('~') => CoordKind::Relative,
            Some('^') => CoordKind::Local,
            Some(_) => CoordKind::Absolute,
            None => return Err(self.scanner.error("expected coordinate")),
        };
        let coord = if kind == CoordKind::Absolute {
            let number = self.scanner.scan_number()?;
            let value = if center && number.is_integer() {
                number.value + 0.5
            } else {
                number.value
            };
            Coord::absolute(value)
        } else {
            self.scanner.advance(false);
            let value = if self.scanner.at_number() {
                self.scanner.scan_number()?.value
            } else {
                0.0
            };
            Coord { kind, value }
        };
        match self.scanner.peek(false) {
            None | Some('~' | '^') => Ok(coord),
            Some(c) if self.scanner.is_whitespace(c) => Ok(coord),
            Some(c) => Err(self.scanner.error(format!("unexpected `{c}` in coordinate"))),
        }
    }

    fn components<const N: usize>(mut self, center: [bool; N]) -> Result<[Coord; N]> {
        let mut coords = [Coord::relative(0.0); N];
        for (coord, center) in coords.iter_mut().zip(center) {
            *coord = self.component(center)?;
        }
        self.scanner.expect_end()?;
        Ok(coords)
    }
}

/// A three-component position such as `~ ~1 ~` or `^ ^ ^2`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionExpr {
    coords: [Coord; 3],
}

impl PositionExpr {
    /// Creates a position from components.
    #[must_use]
    pub const fn new(x: Coord, y: Coord, z: Coord) -> Self {
        Self { coords: [x, y, z] }
    }

    /// `~ ~ ~`: the current position.
    #[must_use]
    pub const fn here() -> Self {
        Self::new(Coord::relative(0.0), Coord::relative(0.0), Coord::relative(0.0))
    }

    /// `^ ^ ^`: the current position, in local notation.
    #[must_use]
    pub const fn local_origin() -> Self {
        Self::new(Coord::local(0.0), Coord::local(0.0), Coord::local(0.0))
    }

    /// Parses a position, taking whole-number absolute components as written.
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed text or a component count other
    /// than three.
    pub fn parse(text: &str) -> Result<Self> {
        let coords = VectorParser::new(text).components([false; 3])?;
        Ok(Self { coords })
    }

    /// Parses a block position: whole-number absolute `x` and `z` are moved
    /// to the centre of their block (`+0.5`).
    ///
    /// # Errors
    ///
    /// See [`PositionExpr::parse`].
    pub fn parse_centered(text: &str) -> Result<Self> {
        let coords = VectorParser::new(text).components([true, false, true])?;
        Ok(Self { coords })
    }

    /// The components, `x y z` order.
    #[must_use]
    pub fn coords(&self) -> [Coord; 3] {
        self.coords
    }

    /// True if every component is local.
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.coords.iter().all(|c| c.kind == CoordKind::Local)
    }

    /// Resolves against an origin and facing.
    ///
    /// Local triples are read as `^left ^up ^forward`.
    ///
    /// # Errors
    ///
    /// Returns [`voxecute_foundation::ErrorKind::InvalidNotation`] if local
    /// and non-local components are mixed.
    pub fn resolve(&self, origin: Vec3, rotation: Rotation) -> Result<Vec3> {
        let locals = self
            .coords
            .iter()
            .filter(|c| c.kind == CoordKind::Local)
            .count();
        match locals {
            0 => Ok(Vec3::new(
                self.coords[0].resolve_against(origin.x),
                self.coords[1].resolve_against(origin.y),
                self.coords[2].resolve_against(origin.z),
            )),
            3 => {
                let [left, up, forward] = self.coords.map(|c| c.value);
                Ok(rotation.local_frame().offset(origin, left, up, forward))
            }
            _ => Err(Error::invalid_notation(format!(
                "cannot mix local and world coordinates in `{self}`"
            ))),
        }
    }
}

impl fmt::Display for PositionExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.coords;
        write!(f, "{x} {y} {z}")
    }
}

/// A two-component rotation such as `~90 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationExpr {
    coords: [Coord; 2],
}

impl RotationExpr {
    /// Creates a rotation from `yaw` and `pitch` components.
    #[must_use]
    pub const fn new(yaw: Coord, pitch: Coord) -> Self {
        Self {
            coords: [yaw, pitch],
        }
    }

    /// Parses `yaw pitch`.
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed text.
    pub fn parse(text: &str) -> Result<Self> {
        let coords = VectorParser::new(text).components([false; 2])?;
        Ok(Self { coords })
    }

    /// The components, `yaw pitch` order.
    #[must_use]
    pub fn coords(&self) -> [Coord; 2] {
        self.coords
    }

    /// Resolves against the current rotation.
    ///
    /// # Errors
    ///
    /// Returns [`voxecute_foundation::ErrorKind::InvalidNotation`] if any
    /// component is local.
    pub fn resolve(&self, current: Rotation) -> Result<Rotation> {
        if self.coords.iter().any(|c| c.kind == CoordKind::Local) {
            return Err(Error::invalid_notation(format!(
                "rotations cannot use local coordinates: `{self}`"
            )));
        }
        Ok(Rotation::new(
            self.coords[0].resolve_against(current.yaw()),
            self.coords[1].resolve_against(current.pitch()),
        ))
    }
}

impl fmt::Display for RotationExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [yaw, pitch] = self.coords;
        write!(f, "{yaw} {pitch}")
    }
}
