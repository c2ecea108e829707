mod url;

pub use url::{
    CreateUrlRequest, CreateUrlResponse, ListIdsResponse, RecordStatsResponse, ResolveResponse,
    ServiceStatsResponse, UpdateUrlRequest, UrlRecord,
};
