fn main() {
    // Tell Cargo to rerun this build script if app.rc or app.manifest changes.
    println!("cargo:rerun-if-changed=app.rc");
    println!("cargo:rerun-if-changed=app.manifest");

    // Compile app.rc and link it. On non-Windows targets this does nothing.
    let _ = embed_resource::compile("app.rc", embed_resource::NONE);
}
