mod day;
mod helpers;
mod meal;
mod prefs;
mod transfer;
mod water;
mod weight;

pub(crate) use day::{cmd_comply, cmd_history, cmd_observe, cmd_show, cmd_sleep, cmd_workout};
pub(crate) use meal::{cmd_meal_add, cmd_meal_notes, cmd_meal_remove, cmd_meal_suggest, cmd_meal_time};
pub(crate) use prefs::{cmd_profile_clear, cmd_profile_set, cmd_profile_show, cmd_theme};
pub(crate) use transfer::{cmd_clear, cmd_export, cmd_import, cmd_seed};
pub(crate) use water::{cmd_water_add, cmd_water_goal, cmd_water_remove, cmd_water_show};
pub(crate) use weight::{cmd_weight_convert, cmd_weight_set, cmd_weight_show};
