pub mod matching;
pub mod profile;
pub mod recommendation;

pub use matching::{
    BusinessPotential, CohortStat, InteractionKind, InteractionOutcome, InteractionRecord,
    MatchResult, MatchingFactors, MatchingRequest,
};
pub use profile::{Profile, ProfileFieldChange, ProfileStatus, ProfileType};
pub use recommendation::{ProactiveRecommendation, RecommendationKind, TrendRecord};
