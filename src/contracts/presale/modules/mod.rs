pub mod presale;
