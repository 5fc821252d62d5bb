//! Configuration section definitions.
//!
//! | Section       | Purpose                                        |
//! |---------------|------------------------------------------------|
//! | `[lifecycle]` | Visibility marker that triggers appearance     |
//! | `[deck]`      | How slide elements are found in a deck         |
//! | `[links]`     | External link rewriting                        |
//! | `[media]`     | Deferred image / frame loading                 |
//! | `[charts]`    | Chart placeholder attributes                   |
//! | `[embed]`     | Third-party embed widget loading               |

mod charts;
mod deck;
mod embed;
mod lifecycle;
mod links;
mod media;

pub use charts::ChartsConfig;
pub use deck::DeckConfig;
pub use embed::EmbedConfig;
pub use lifecycle::LifecycleConfig;
pub use links::LinksConfig;
pub use media::MediaConfig;
