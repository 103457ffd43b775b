//! Perceptual scenes.
//!
//! A [`Scene`] is a bounded 2-D grid recording what an observer perceives.
//! Each square is blind (never looked at), empty, or occupied by one or more
//! item identifiers. Reads can report coordinates as raw grid indices or
//! relative to the square holding the observer's self marker, and two scenes
//! can be scored against each other to measure recall accuracy.
//!
//! # Example
//!
//! ```
//! use scene::{Frame, ItemSquare, Scene, metrics};
//!
//! let mut seen = Scene::new("seen", 5, 3)?;
//! seen.place_row(0, "  d  ")?;
//! seen.place_row(1, " .c. ")?;
//! seen.place_row(2, "a..b.")?;
//!
//! let mut recalled = Scene::new("recalled", 5, 3)?;
//! recalled.place_row(0, "  d  ")?;
//! recalled.place_row(1, " .c. ")?;
//!
//! assert!(seen.is_blind(0, 0)?);
//! assert_eq!(seen.items_on_square(2, 1, Frame::Absolute, true)?, vec![ItemSquare::new("c", 2, 1)]);
//! assert_eq!(metrics::errors_of_omission(&seen, &recalled)?, 2);
//! assert_eq!(metrics::recall(&seen, &recalled)?, 0.5);
//! # Ok::<(), scene::SceneError>(())
//! ```

mod config;
mod error;
pub mod metrics;
mod scene;
mod square;

pub use config::{Denominator, Markers, SceneConfig, ScoringConfig};
pub use error::{SceneError, SceneResult};
pub use metrics::Comparison;
pub use scene::Scene;
pub use square::{Frame, ItemSquare, Occupants, Square, SquareState};
