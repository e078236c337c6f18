pub mod goal;
