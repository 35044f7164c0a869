use wasm_bindgen::prelude::*;

mod game;
use game::PortfolioRoom;

roam_web::export_walkthrough!(PortfolioRoom, "portfolio-room");
