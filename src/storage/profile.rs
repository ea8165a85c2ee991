use serde::{Deserialize, Serialize};

/// A user-named public/private pair.
///
/// JSON looks like:
/// `{ "name":"home", "public":"Wi-Fi", "private":"Ethernet 2" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharingProfile {
    pub name: String,
    pub public: String,
    pub private: String,
}
