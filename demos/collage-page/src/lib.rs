use wasm_bindgen::prelude::*;

mod page;

reveal_web::export_page!(page::collage_config(), "collage-page");
