use std::io::Result;

fn main() -> Result<()> {
    let proto_files = &["proto/marketplace.proto"];

    // Name of the folder containing the proto definitions
    let proto_folder = "proto";

    // The server half is only consumed by the test fakes in `bazaar-core`.
    tonic_prost_build::configure()
        .build_client(true)
        .build_server(true)
        .compile_protos(proto_files, &[proto_folder])?;

    println!("cargo:rerun-if-changed=proto/marketplace.proto");

    Ok(())
}
