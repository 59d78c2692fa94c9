mod classifier;
mod forum;
mod value_objects;


pub use classifier::{ForumMarkers, LoginOutcome, MarkerClassifier};
pub use forum::Forum;
pub use value_objects::{
    CheckInOutcome, FormData, FormState, ResultRecord, RunReport, CHECK_IN_COMMENT,
    CHECK_IN_EMOTE_ID,
};
