pub mod auth_service;
pub mod campaign_service;
pub mod ledger_service;
pub mod social_media_service;
pub mod video_service;

pub use auth_service::AuthService;
pub use campaign_service::CampaignService;
pub use ledger_service::LedgerService;
pub use social_media_service::SocialMediaService;
pub use video_service::VideoService;
