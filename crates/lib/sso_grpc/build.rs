fn main() {
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&["../../../proto/auth/auth.proto"], &["../../../proto"])
        .expect("Failed to compile protos");

    println!("cargo:rerun-if-changed=../../../proto/auth/auth.proto");
}
