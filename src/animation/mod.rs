pub mod knobs;
