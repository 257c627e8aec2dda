pub use self::{
    asset::{AssetBody, AssetRecord},
    pair::{GaugeRecord, PairRecord, PairsBody},
    rebase::RebaseAprBody,
};

mod asset;
mod pair;
mod rebase;
