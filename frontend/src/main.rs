#[cfg(target_arch = "wasm32")]
fn main() {
    motorph_frontend::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("motorph-frontend runs in the browser; build it for wasm32 with trunk");
}
