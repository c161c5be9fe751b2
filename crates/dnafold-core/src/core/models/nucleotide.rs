use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Unknown dinucleotide code: '{0}'")]
    UnknownDinucleotide(String),
    #[error("Invalid nucleotide '{base}' at position {position}")]
    InvalidNucleotide { base: char, position: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Nucleotide {
    A,
    C,
    G,
    T,
}

impl Nucleotide {
    pub const ALL: [Nucleotide; 4] = [Nucleotide::A, Nucleotide::C, Nucleotide::G, Nucleotide::T];

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Nucleotide::A),
            'C' => Some(Nucleotide::C),
            'G' => Some(Nucleotide::G),
            'T' => Some(Nucleotide::T),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Nucleotide::A => 'A',
            Nucleotide::C => 'C',
            Nucleotide::G => 'G',
            Nucleotide::T => 'T',
        }
    }

    #[inline]
    fn ordinal(self) -> usize {
        self as usize
    }
}

/// An ordered pair of adjacent bases, the unit of rotation-parameter lookup.
///
/// Codes are ordered `AA, AC, AG, AT, CA, ..., TT`; [`Dinucleotide::index`] follows
/// that order and is what tables and noise bounds use as their storage slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Dinucleotide {
    first: Nucleotide,
    second: Nucleotide,
}

impl Dinucleotide {
    pub const COUNT: usize = 16;

    pub const ALL: [Dinucleotide; Self::COUNT] = {
        let mut all = [Dinucleotide {
            first: Nucleotide::A,
            second: Nucleotide::A,
        }; Self::COUNT];
        let mut i = 0;
        while i < Self::COUNT {
            all[i] = Dinucleotide {
                first: Nucleotide::ALL[i / 4],
                second: Nucleotide::ALL[i % 4],
            };
            i += 1;
        }
        all
    };

    pub fn new(first: Nucleotide, second: Nucleotide) -> Self {
        Self { first, second }
    }

    pub fn first(&self) -> Nucleotide {
        self.first
    }

    pub fn second(&self) -> Nucleotide {
        self.second
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.first.ordinal() * 4 + self.second.ordinal()
    }

    pub fn code(&self) -> String {
        [self.first.to_char(), self.second.to_char()].iter().collect()
    }
}

impl fmt::Display for Dinucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.first.to_char(), self.second.to_char())
    }
}

impl FromStr for Dinucleotide {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(a), Some(b), None) => match (Nucleotide::from_char(a), Nucleotide::from_char(b))
            {
                (Some(first), Some(second)) => Ok(Self { first, second }),
                _ => Err(LookupError::UnknownDinucleotide(s.to_string())),
            },
            _ => Err(LookupError::UnknownDinucleotide(s.to_string())),
        }
    }
}

/// A validated DNA sequence over `{A, C, G, T}`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence {
    bases: Vec<Nucleotide>,
}

impl Sequence {
    pub fn new(bases: Vec<Nucleotide>) -> Self {
        Self { bases }
    }

    pub fn bases(&self) -> &[Nucleotide] {
        &self.bases
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Adjacent base pairs, in sequence order. Yields `len - 1` items.
    pub fn dinucleotides(&self) -> impl Iterator<Item = Dinucleotide> + '_ {
        self.bases
            .windows(2)
            .map(|pair| Dinucleotide::new(pair[0], pair[1]))
    }
}

impl FromStr for Sequence {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(position, base)| {
                Nucleotide::from_char(base)
                    .ok_or(LookupError::InvalidNucleotide { base, position })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for base in &self.bases {
            write!(f, "{}", base.to_char())?;
        }
        Ok(())
    }
}
