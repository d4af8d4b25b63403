// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Gender, Height, HeightBucket, NewPerson, Person, PersonView, Quota, QuotaPolicy};
pub use requests::{AddPersonRequest, MatchRequest, SinglePeopleQuery};
pub use responses::{
    AddPersonResponse, DumpResponse, ErrorResponse, HealthResponse, PeopleResponse, SuccessResponse,
};
