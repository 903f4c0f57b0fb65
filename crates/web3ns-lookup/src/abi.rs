//! Read-only contract methods the lookups call

alloy_sol_types::sol! {
    interface IEnsRegistry {
        function resolver(bytes32 node) external view returns (address);
    }

    interface IEnsResolver {
        function addr(bytes32 node) external view returns (address);
        function text(bytes32 node, string key) external view returns (string);
        function name(bytes32 node) external view returns (string);
    }

    interface IErc721 {
        function ownerOf(uint256 tokenId) external view returns (address);
    }

    interface ILensHub {
        function getProfileIdByHandle(string handle) external view returns (uint256);
    }

    interface IThreeNum {
        function e164uintToTokenId(uint56 number) external pure returns (uint256);
    }

    interface IFarcasterIdRegistry {
        function idOf(address owner) external view returns (uint256);
    }
}
