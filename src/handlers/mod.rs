// Two security tiers: public (no credential) and protected (bearer token +
// per-group role requirement, enforced in main's route layers).
pub mod protected;
pub mod public;
