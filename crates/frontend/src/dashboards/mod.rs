pub mod goal_stats;
