pub mod user;
pub mod business_account;
pub mod creator_account;
pub mod campaign;
pub mod campaign_budget_tracking;
pub mod participation;
pub mod video;
pub mod transaction;
pub mod social_account;
pub mod campaign_message;

pub use user::Entity as User;
pub use business_account::Entity as BusinessAccount;
pub use creator_account::Entity as CreatorAccount;
pub use campaign::Entity as Campaign;
pub use campaign_budget_tracking::Entity as CampaignBudgetTracking;
pub use participation::Entity as Participation;
pub use video::Entity as Video;
pub use transaction::Entity as Transaction;
pub use social_account::Entity as SocialAccount;
pub use campaign_message::Entity as CampaignMessage;
