pub mod smile;
pub mod temporal;
pub mod types;

pub use smile::{build_smile, decompose_wing_vols, recompose_quotes, vanna_volga_weights};
pub use types::{DeltaStrikePoint, Smile, SmileAnchors, WingVols};
