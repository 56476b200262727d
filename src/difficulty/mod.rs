//! Difficulty policy: board shapes, special-card quotas, custom validation.

pub mod policy;

pub use policy::{
    describe_custom, dimensions, is_valid_custom, regular_count_is_valid, special_card_quota,
    special_composition, validate_custom, Difficulty, Dimensions, LevelOutline, FACE_POOL_SIZE,
    MAX_CARDS, MAX_QUOTA, MAX_REGULAR, MAX_SIDE, MIN_CARDS, MIN_REGULAR, MIN_SIDE,
};
