pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod enums;
pub mod error;
pub mod mail;
pub mod policy;
pub mod services;
pub mod storage;
pub mod validate;

pub use config::Config;
pub use enums::{
    CampaignStatus,
    Currency,
    ParticipationStatus,
    SocialPlatform,
    TransactionStatus,
    TransactionType,
    UserRole,
    VideoStatus,
};
pub use error::{ AppError, Result };
