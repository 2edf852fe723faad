//! Status & stat engine: derived stats, status-effect lifecycle, gear
//! breaks and repeatable-action budgets.

pub mod repeatable;
pub mod stats;
pub mod status;

pub use repeatable::{
    calculate_and_update_repeatable_actions, check_repeatable_action, count_uses_this_turn,
    refresh_learned_actions, repeatable_budget, set_repeatable_action_activations, RepeatableUse,
};
pub use stats::{calculate_stats, derived_stats};
pub use status::{
    apply_target_effects, break_gear, update_champion_status_effects, StatusEffect,
    StatusEffectName,
};
