// Copyright 2020 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

#[macro_use]
extern crate lazy_static;

pub mod network {
    /// Network ids, as assigned by the primary network.
    pub const MAINNET_ID: u32 = 1;
    pub const TESTNET_ID: u32 = 5;
    pub const LOCAL_ID: u32 = 12345;
}

pub mod chain_id {
    pub const AVALANCHE_MAINNET: u64 = 43114;

    // Mainnet asset chains.
    pub const JUNE_JUNE: u64 = 45003;
    pub const JUNE_DAI1: u64 = 45004;
    pub const JUNE_USDT1: u64 = 45005;
    pub const JUNE_USD1: u64 = 45006;
    pub const JUNE_MBTC1: u64 = 45007;
    pub const JUNE_GLD1: u64 = 45008;
    pub const JUNE_LTC1: u64 = 45009;
    pub const JUNE_DOGE1: u64 = 45010;
    pub const JUNE_EUR1: u64 = 45011;
    pub const JUNE_SGD1: u64 = 45012;
    pub const JUNE_BCH1: u64 = 45013;
    pub const JUNE_LINK1: u64 = 45014;

    // Testnet asset chains.
    pub const SOCOTRA_JUNE: u64 = 101003;
    pub const SOCOTRA_DAI1: u64 = 101004;
    pub const SOCOTRA_USDT1: u64 = 101005;
    pub const SOCOTRA_USD1: u64 = 101006;
    pub const SOCOTRA_MBTC1: u64 = 101007;
    pub const SOCOTRA_GLD1: u64 = 101008;
    pub const SOCOTRA_LTC1: u64 = 101009;
    pub const SOCOTRA_DOGE1: u64 = 101010;
    pub const SOCOTRA_EUR1: u64 = 101011;
    pub const SOCOTRA_SGD1: u64 = 101012;
    pub const SOCOTRA_BCH1: u64 = 101013;
    pub const SOCOTRA_LINK1: u64 = 101014;
}

pub mod fee {
    pub const ONE_GWEI: u64 = 1_000_000_000;

    pub const APRICOT_PHASE_3_INITIAL_BASE_FEE: u64 = 225 * ONE_GWEI;
    pub const APRICOT_PHASE_4_MIN_BASE_FEE: u64 = 25 * ONE_GWEI;

    /// Size of the dynamic fee window stored at the head of the header
    /// extra data. Anything past it is the predicate results payload.
    pub const DYNAMIC_FEE_EXTRA_DATA_SIZE: usize = 80;

    /// Minimum base fees per asset chain: (initial, previous, latest). The
    /// latest value applies once the first fee update is active.
    pub const JUNE_MIN_BASE_FEES: (u64, u64, u64) =
        (48 * ONE_GWEI, 144 * ONE_GWEI, 144 * ONE_GWEI);
    pub const MBTC_MIN_BASE_FEES: (u64, u64, u64) =
        (13 * ONE_GWEI, 22 * ONE_GWEI, 22 * ONE_GWEI);
    pub const DOGE_MIN_BASE_FEES: (u64, u64, u64) =
        (6477 * ONE_GWEI, 9524 * ONE_GWEI, 9524 * ONE_GWEI);
    pub const USD_MIN_BASE_FEES: (u64, u64, u64) =
        (476 * ONE_GWEI, 1429 * ONE_GWEI, 1429 * ONE_GWEI);
    pub const EUR_MIN_BASE_FEES: (u64, u64, u64) =
        (433 * ONE_GWEI, 1299 * ONE_GWEI, 1299 * ONE_GWEI);
    pub const LTC_MIN_BASE_FEES: (u64, u64, u64) =
        (54 * ONE_GWEI, 17 * ONE_GWEI, 17 * ONE_GWEI);
    pub const GLD_MIN_BASE_FEES: (u64, u64, u64) =
        (3 * ONE_GWEI, ONE_GWEI, ONE_GWEI);
    pub const SGD_MIN_BASE_FEES: (u64, u64, u64) =
        (635 * ONE_GWEI, 1905 * ONE_GWEI, 1905 * ONE_GWEI);
    pub const BCH_MIN_BASE_FEES: (u64, u64, u64) =
        (ONE_GWEI, 3 * ONE_GWEI, 3 * ONE_GWEI);
    pub const LINK_MIN_BASE_FEES: (u64, u64, u64) =
        (26 * ONE_GWEI, 102 * ONE_GWEI, 102 * ONE_GWEI);
    /// Fallback for chains without a dedicated entry.
    pub const DEFAULT_MIN_BASE_FEES: (u64, u64, u64) = (
        APRICOT_PHASE_3_INITIAL_BASE_FEE,
        APRICOT_PHASE_4_MIN_BASE_FEE,
        APRICOT_PHASE_4_MIN_BASE_FEE,
    );
}

pub mod asset {
    pub const MAINNET_PRIMARY_ASSET_IDS: [&str; 11] = [
        "Ld5aCozSMQ1hC5jdXS3mhGNgoYVjVDe8zPTtPSbs4xS5JQSfJ",
        "2A1NW7YEoPSaKGy2LWUnbqiw2nFUTUt8rk9wzTzqZaqG2w7aB4",
        "jB86KaCskBuRjqA6cUeyy2GtWpdF2i9MigV6yuGekojmTbQTC",
        "2CkzBNwEKvreEwYp2froWJePpXfruZu6iemJVfNqUAtVjJDRkp",
        "2Bi6ovdELbjXhSxs9fQTMPWUHcCbvJJZV4pHLkwcQyD7dDrqLG",
        "HNihfvex33EDsuHuQddQpBpwUtkotLwnt54aj7GkGrxY9mLGz",
        "2oWo7iw26bbY2bAt9pFfbFpTCnFVVY2CePDHM4tjTeV7e4FPoQ",
        "47Y4SGbEzTCQ1DCzBaSnE34qTuQH7MBV99FsFHptodbQEn32u",
        "27LfLHoSPYdspLG8QwMjvRby2XfLKS8eCZt2mTnJXM65fAduVv",
        "2RBX4TiRmUxU1FsmNmEgdEGcFtgPr9NTGqnm5f33mK8adciKsA",
        "2No8EzWaiCH7TQUh3bUqaKhAY6TLxe8doo15ftvtnkgvGLX9K9",
    ];

    // The testnet was bootstrapped from the same asset definitions.
    pub const TESTNET_PRIMARY_ASSET_IDS: [&str; 11] = MAINNET_PRIMARY_ASSET_IDS;
}

pub mod reserved_account {
    use jeth_types::{Address, AddressUtil};

    /// Leading bytes of the reserved bridged-asset accounts, in the order
    /// ETH1, MBTC1, DOGE1, TUSD1, USDT1, DAI1, EUROC1, LTC1, XLM1, BCH1,
    /// PAXG1, ICP1, XIDR1, XSGD1, ETC1, R1000, R10.
    pub const MULTI_COIN_ACCOUNT_PREFIXES: [u8; 17] =
        [45, 46, 47, 48, 49, 50, 51, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61];

    lazy_static! {
        /// Accounts exempt from multi-coin debit checks. They mint and burn
        /// bridged assets, so they are never debited.
        pub static ref MULTI_COIN_ACCOUNTS: Vec<Address> =
            MULTI_COIN_ACCOUNT_PREFIXES
                .iter()
                .map(|prefix| Address::from_leading_byte(*prefix))
                .collect();
    }
}
