//! In-memory social graph: users, undirected friendships, shortest paths,
//! friend suggestions and Girvan–Newman style community detection.

pub mod adjacency;
pub mod betweenness;
pub mod community;
pub mod config;
pub mod logger;
pub mod path_finder;
pub mod recommender;
pub mod script;
pub mod shared;
pub mod social_graph;
pub mod types;
pub mod user_registry;

pub use crate::community::DetectionStep;
pub use crate::shared::SharedSocialGraph;
pub use crate::social_graph::SocialGraph;
pub use crate::types::{Community, Edge, Partition, Suggestion, User, UserId};
