use alloy_sol_types::sol;

pub use alloy_ens::{
    namehash, reverse_address, ENS_ADDRESS as ENS_REGISTRY_ADDRESS,
    ENS_REVERSE_REGISTRAR_DOMAIN as REVERSE_SUFFIX,
};

sol! {
    /// Registry lookups, deployed at [`ENS_REGISTRY_ADDRESS`] on mainnet and testnets
    interface EnsRegistry {
        function resolver(bytes32 node) external view returns (address);
    }

    /// Public resolver records. Reverse resolvers implement only `name`
    interface EnsResolver {
        function name(bytes32 node) external view returns (string);
        function addr(bytes32 node) external view returns (address);
    }
}

/// Checks that the name consists of non-empty dot separated labels.
///
/// Full UTS-46 normalization is not performed, so non-ASCII labels are passed as is.
pub fn validate_name(name: &str) -> bool {
    let mut segment_start = 0;
    let mut segment_end = 0;
    for (pos, char) in name.char_indices() {
        match char {
            '.' => {
                if segment_start == segment_end {
                    return false;
                }
                segment_start = pos + 1;
                segment_end = segment_start;
                continue;
            }
            '0'..='9' | 'a'..='z' | 'A'..='Z' | '-' | '_' => {}
            c if !c.is_ascii() => {}
            _ => return false,
        }
        segment_end = pos + char.len_utf8();
    }
    segment_start != segment_end
}

/// Form of a valid name which is hashed for registry lookups
pub fn normalize_name(name: &str) -> String {
    name.to_ascii_lowercase()
}
