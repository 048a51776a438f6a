// handlers/mod.rs - two handler tiers
//
// Public (no auth): service banner and health
// Protected (bearer JWT): /api/courses/*
pub mod protected;
pub mod public;
