//! The `platforms` command: print the supported platform table.

use vpack_schema::PlatformId;

pub fn platforms() {
    println!("supported platforms:");
    for platform in PlatformId::ALL {
        let spec = platform.spec();
        println!(
            "  {:<14} upstream suffix: {:<22} format: {:<7} bin correction: {}",
            platform.as_str(),
            spec.upstream_suffix,
            spec.format.extension(),
            if spec.synthesize_bin { "yes" } else { "no" }
        );
    }
}
